#![allow(dead_code)]

pub mod avatar_server;
