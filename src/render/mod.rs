pub mod backend;
pub(crate) mod blur;
pub(crate) mod composite;
pub mod cpu;
pub mod passes;
pub mod pipeline;
