//! Library side of the mdlg CLI, shared by the binary and its tests.

pub mod transforms;
