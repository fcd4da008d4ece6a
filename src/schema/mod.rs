pub mod config;
pub mod element;
pub mod fragment;
