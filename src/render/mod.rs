pub(crate) mod cpu;
pub(crate) mod plan;
pub(crate) mod style;
pub(crate) mod text;
