pub(crate) mod device;
pub(crate) mod icons;
pub(crate) mod request;
