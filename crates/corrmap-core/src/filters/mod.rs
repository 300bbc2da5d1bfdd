pub mod mean_filter;
