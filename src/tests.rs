// src/tests.rs
