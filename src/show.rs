pub(crate) mod registry;
pub(crate) mod slideshow;
