//! cfn-sub-vars - convert `#{Var}` placeholders in CloudFormation templates
//! into `Fn::Sub` expressions.
//!
//! This library provides the core functionality for cfn-sub, including:
//! - Delimiter configuration parsing and cascade discovery
//! - Placeholder matching and in-place template rewriting
//! - JSON and YAML template loading and rendering
//!
//! # Example
//!
//! ```
//! use cfn_sub_vars::config::DelimiterConfig;
//! use cfn_sub_vars::rewrite::rewrite;
//! use serde_json::json;
//!
//! let mut template = json!({
//!     "Resources": {
//!         "Bucket": { "Properties": { "BucketName": "my-#{Env}-bucket" } }
//!     }
//! });
//!
//! let changes = rewrite(&mut template, &DelimiterConfig::default()).unwrap();
//!
//! assert_eq!(
//!     template["Resources"]["Bucket"]["Properties"]["BucketName"],
//!     json!({ "Fn::Sub": "my-${Env}-bucket" })
//! );
//! for change in &changes {
//!     println!("{}", change);
//! }
//! ```

pub mod config;
pub mod error;
pub mod rewrite;
pub mod template;

pub use error::{Result, SubError};
