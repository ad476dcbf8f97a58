//! Headless simulation - run the match without a window

mod app_builder;

pub use app_builder::HeadlessAppBuilder;
