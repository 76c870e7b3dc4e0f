pub(crate) mod canvas;
pub(crate) mod slides;
pub(crate) mod text;
