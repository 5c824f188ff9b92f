pub(crate) mod noise;
pub(crate) mod sampler;
