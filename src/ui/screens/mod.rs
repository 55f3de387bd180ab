pub(crate) mod form;
pub(crate) mod summary;
