//! Library components of the `crm-import` command line tool.

pub mod logging;
pub mod pipeline;
