#![no_std]

mod error;

pub mod config;
pub mod device;
pub mod interface;
mod log;
pub mod params;
pub mod registers;
pub mod report;
pub mod work;

pub use crate::device::{DeviceState, Mpr121};
pub use crate::error::{Error, Result};
pub use crate::report::{ChannelEvent, TouchMask, TouchReport, TouchSink};
