pub mod fx_shock;
pub mod random_params;
