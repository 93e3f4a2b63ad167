pub(crate) mod cover;
