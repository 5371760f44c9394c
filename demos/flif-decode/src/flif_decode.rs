//! This example decodes a FLIF file to a raw interleaved RGBA8 file.

// flif crate
extern crate flif;

// CLI crate
extern crate clap;

// Logging
extern crate env_logger;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flif::color_range::ColorVal;
use flif::decoder::Decoder;
use flif::io::SliceSource;

use clap::{App, Arg};

fn main() -> std::io::Result<()> {
    env_logger::init();

    let matches = App::new("flif-decode")
        .about("Decodes a FLIF image to raw interleaved RGBA8")
        .arg(
            Arg::new("input-path")
                .help("FLIF file to decode")
                .short('i')
                .long("input")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("output-path")
                .help("Output raw RGBA8 file")
                .short('o')
                .long("output")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("identify")
                .help("Only print the container header, without decoding pixels")
                .long("identify"),
        )
        .get_matches();

    let input_path = matches.value_of("input-path").map(Path::new).unwrap();
    let output_path = matches.value_of("output-path").map(Path::new).unwrap();

    let bytes = std::fs::read(input_path)?;
    let mut source = SliceSource::new(&bytes);

    if matches.is_present("identify") {
        let header = Decoder::identify(&mut source).unwrap_or_else(|err| {
            eprintln!("Cannot parse FLIF header: {err}");
            std::process::exit(1);
        });
        println!(
            "{}x{}, {} plane(s), {:?}, {} frame(s)",
            header.width, header.height, header.num_planes, header.method, header.num_frames
        );
        return Ok(());
    }

    let image = Decoder::new(&mut source).decode().unwrap_or_else(|err| {
        eprintln!("Cannot decode FLIF image: {err}");
        std::process::exit(1);
    });

    let max: ColorVal = observed_max(&image);
    let mut output_file = BufWriter::new(File::create(output_path)?);
    for f in 0..image.frames.len() {
        for r in 0..image.height {
            output_file.write_all(&image.row_rgba8(f, r, max))?;
        }
    }
    println!("Done.");
    Ok(())
}

/// The reference decoder derives its normalization shift from the
/// declared plane range (`image.max(0)`); this CLI has no direct access
/// to that range once `decode()` has consumed the `Decoder`, so it
/// approximates with the actual highest pixel value decoded, rounded up
/// to the nearest `2^n - 1`.
fn observed_max(image: &flif::Image) -> ColorVal {
    let mut peak: ColorVal = 0;
    for frame in &image.frames {
        for plane in frame.planes.iter().take(3.min(frame.planes.len())) {
            for r in 0..plane.height() {
                for c in 0..plane.width() {
                    peak = peak.max(plane.get(r, c));
                }
            }
        }
    }
    let mut bound = 1;
    while bound < peak {
        bound = (bound << 1) | 1;
    }
    bound.max(1)
}
