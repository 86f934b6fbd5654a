pub mod config_ops;
pub mod decode_ops;
pub mod dict_ops;
