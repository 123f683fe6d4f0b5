//! Build descriptor generation for imgslim.
//!
//! # Optimize pipeline
//!
//! ```text
//! imgslim check
//!   1. Render     ── DescriptorGenerator::render()
//!   2. Write      ── descriptor::write_descriptor() (overwrites)
//!   3. Build      ── <engine> build --no-cache -f <descriptor> -t <image>_optimized
//! ```
//!
//! # Descriptor layout
//!
//! Two stages, and only the compiled entry point crosses between them:
//! - **build**: full JDK image, `COPY . .`, `javac <entry>.java`
//! - **runtime**: slim image, `COPY --from=build /app/<entry>.class`

pub mod descriptor;
pub mod dockerfile;

pub use descriptor::{DescriptorError, load_descriptor, write_descriptor};
pub use dockerfile::DescriptorGenerator;
