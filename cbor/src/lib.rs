#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod decode;
pub mod types;

mod decode_seq;
