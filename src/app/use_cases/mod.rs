//! Use-Cases der Application-Layer-Orchestrierung.

pub mod camera;
pub mod capture;
pub mod export;
pub mod layers;
pub mod pointer;
pub mod selection;
