use imgslim_core::BuildConfig;

/// Generates the two-stage build descriptor used to produce the optimized image.
pub struct DescriptorGenerator<'a> {
    config: &'a BuildConfig,
}

impl<'a> DescriptorGenerator<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self { config }
    }

    pub fn render(&self) -> String {
        format!(
            r#"# === Stage 1: Build ===
FROM {builder} AS build
WORKDIR /app
COPY . .
RUN javac {entry}.java

# === Stage 2: Runtime (compiled output only) ===
FROM {runtime}
WORKDIR /app
COPY --from=build /app/{entry}.class /app/
CMD ["java", "{entry}"]
"#,
            builder = self.config.builder_image,
            runtime = self.config.runtime_image,
            entry = self.config.entry_point,
        )
    }
}
