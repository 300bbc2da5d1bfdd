use console::Style;
use corrmap_core::pipeline::config::AnalysisConfig;
use corrmap_core::pipeline::{AnalysisOutput, RegionOutcome};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    error: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            error: Style::new().red(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_analysis_summary(config: &AnalysisConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Correlation Map Analysis"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(24)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output_dir.display())
    );
    match &config.smoothing {
        Some(sm) => println!(
            "  {:<14}{}",
            s.label.apply_to("Smoothing"),
            s.value.apply_to(format!("mean, radius {} px", sm.radius))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Smoothing"),
            s.disabled.apply_to("disabled")
        ),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Maps"),
        s.value.apply_to("TIFF (32-bit float)")
    );
    match config.export.preview {
        Some(format) => println!(
            "  {:<14}{}",
            s.label.apply_to("Preview"),
            s.value.apply_to(format)
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Preview"),
            s.disabled.apply_to("none")
        ),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Residuals"),
        if config.export.residuals {
            s.value.apply_to("export")
        } else {
            s.disabled.apply_to("not exported")
        }
    );
    println!();

    println!("  {}", s.header.apply_to("Regions"));
    if config.regions.is_empty() {
        println!("    {}", s.disabled.apply_to("none"));
    }
    for (i, roi) in config.regions.iter().enumerate() {
        println!("    {}. {}", s.label.apply_to(i + 1), s.value.apply_to(roi));
    }
    println!();
}

pub fn print_results(output: &AnalysisOutput) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Results"));
    println!(
        "    {:<12}{}x{} x {} frames",
        s.label.apply_to("Stack"),
        output.source.width,
        output.source.height,
        output.source.total_frames
    );

    for (i, region) in output.regions.iter().enumerate() {
        match &region.outcome {
            RegionOutcome::Mapped {
                seed,
                peak,
                undefined,
                path,
                preview,
            } => {
                println!(
                    "    {}. seed {} -> {}",
                    s.label.apply_to(i + 1),
                    s.value.apply_to(seed),
                    s.path.apply_to(path.display())
                );
                if let Some(preview) = preview {
                    println!(
                        "       {:<10}{}",
                        s.label.apply_to("Preview"),
                        s.path.apply_to(preview.display())
                    );
                }
                if let Some((at, value)) = peak {
                    println!(
                        "       {:<10}{:.4} at {}",
                        s.label.apply_to("Peak"),
                        value,
                        at
                    );
                }
                if *undefined > 0 {
                    println!(
                        "       {:<10}{}",
                        s.label.apply_to("Undefined"),
                        s.disabled.apply_to(format!("{undefined} pixel(s)"))
                    );
                }
            }
            RegionOutcome::Failed(e) => {
                println!(
                    "    {}. {} {}",
                    s.label.apply_to(i + 1),
                    region.roi,
                    s.error.apply_to(format!("failed: {e}"))
                );
            }
        }
    }

    if let Some(ref stack) = output.residual_stack {
        println!(
            "    {:<12}{} ({} frame(s))",
            s.label.apply_to("Residuals"),
            s.path.apply_to(stack.display()),
            output.source.total_frames
        );
    }
    println!();
}
