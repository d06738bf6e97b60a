// Domain model for qq: call sites, matching, classification and formatting.

pub mod argument;
pub mod call_site;
pub mod entry;
pub mod format;
pub mod grouping;
pub mod matcher;
pub mod render;
