//! Utility modules shared by the analysis and document layers.

pub mod array_util;
pub mod bytes_ref;
pub mod numeric_utils;
