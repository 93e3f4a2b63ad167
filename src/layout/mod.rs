pub(crate) mod book_layout;
pub(crate) mod grid;
