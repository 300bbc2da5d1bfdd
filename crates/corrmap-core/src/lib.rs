pub mod consts;
pub mod correlation;
pub mod error;
pub mod filters;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod regression;
pub mod residual;
pub mod roi;
pub mod trace;
pub mod volume;
