pub(crate) mod crop;
