pub(crate) mod blit;
pub(crate) mod blur;
pub(crate) mod clock;
pub(crate) mod composite;
pub(crate) mod compositor;
pub(crate) mod surface;
pub(crate) mod text;
