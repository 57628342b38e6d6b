//! Test Module
//!
//! Test suite for the CareBot core.
//!
//! ## Test Categories
//! - `brain_tests`: Intent training, classification and the confidence policy
//! - `router_tests`: Crisis routing, reply selection and session logging
//! - `sentiment_tests`: Lexicon and HTTP sentiment backends
//! - `config_tests`: Environment configuration
//! - `survey_tests`: Survey CSV aggregation
//! - `integration_tests`: End-to-end conversations through `bootstrap`

mod integration_tests;
