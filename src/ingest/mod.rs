pub(crate) mod csv;
