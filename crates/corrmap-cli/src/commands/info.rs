use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use corrmap_core::io::image_io::{list_image_sequence, load_image};
use corrmap_core::io::is_tiff_path;
use corrmap_core::io::ser::SerReader;
use corrmap_core::io::tiff_stack::load_tiff_stack;

#[derive(Args)]
pub struct InfoArgs {
    /// Input SER file, TIFF stack or directory of frames
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    if args.file.is_dir() {
        return run_sequence(args);
    }
    if is_tiff_path(&args.file) {
        return run_tiff(args);
    }

    let reader = SerReader::open(&args.file)?;
    let info = reader.source_info(&args.file);

    println!("File:        {}", info.filename.display());
    println!("Frames:      {}", info.total_frames);
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Bit depth:   {}", info.bit_depth);
    println!("Color mode:  {:?}", info.color_mode);

    if let Some(ref obs) = info.observer {
        println!("Observer:    {}", obs);
    }
    if let Some(ref tel) = info.telescope {
        println!("Telescope:   {}", tel);
    }
    if let Some(ref inst) = info.instrument {
        println!("Instrument:  {}", inst);
    }

    // Decoded f32 volume, plus the residual volume of the same size.
    let samples = info.width as usize * info.height as usize * info.total_frames;
    let mb = (samples * std::mem::size_of::<f32>()) as f64 / (1024.0 * 1024.0);
    println!("Volume size: {:.1} MB (x2 with residuals)", mb);

    Ok(())
}

fn run_sequence(args: &InfoArgs) -> Result<()> {
    let paths = list_image_sequence(&args.file)?;
    println!("Directory:   {}", args.file.display());
    println!("Files:       {}", paths.len());
    if let Some(first) = paths.first() {
        let frame = load_image(first)?;
        println!("Dimensions:  {}x{}", frame.width(), frame.height());
        println!("First frame: {}", first.display());
    }
    Ok(())
}

fn run_tiff(args: &InfoArgs) -> Result<()> {
    let frames = load_tiff_stack(&args.file)?;
    println!("File:        {}", args.file.display());
    println!("Pages:       {}", frames.len());
    if let Some(first) = frames.first() {
        println!("Dimensions:  {}x{}", first.width(), first.height());
        println!("Bit depth:   {}", first.original_bit_depth);
    }
    Ok(())
}
