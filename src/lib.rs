
pub mod service {
    pub mod config_service;
    pub mod ffmpeg;
    pub mod file;
    pub mod library;
    pub mod runner;
    pub mod zip;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod facade {
    pub mod batch_facade;
    pub mod traits {
        pub mod i_batch;
    }
}

pub mod models {
    pub mod batch;
    pub mod file;
    pub mod job;
    pub mod placement;
    pub mod preview;
    pub mod zip;
}

pub mod utils {
    pub mod utils;
}
