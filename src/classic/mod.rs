pub mod clvm;
