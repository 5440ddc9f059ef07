#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use fp_flat as flat;
pub use fp_reflect as reflect;
pub use fp_utils as utils;
