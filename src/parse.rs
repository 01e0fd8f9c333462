pub(crate) mod cursor;
pub(crate) mod directive;
pub(crate) mod reader;
