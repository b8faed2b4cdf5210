//! Cloud provider modules.
//!
//! ```yaml
//! - name: Create a public hosted zone
//!   aws_route53_zone:
//!     zone: example.com
//!     comment: production apex
//!     region: us-east-1
//! ```

pub mod aws;

pub use aws::{AwsConnectionConfig, Route53ZoneModule};
