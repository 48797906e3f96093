use {
    base::{Vec2, init_stdout_logger},
    image::{FOURCC_MJPG, Image, parse_fourcc},
    videoio::*,
};

const USAGE: &str = "usage: videoio-copy <input> <output> [FOURCC] [FPS]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stdout_logger();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (input, output) = match (args.first(), args.get(1)) {
        (Some(input), Some(output)) => (input.as_str(), output.as_str()),
        _ => return Err(USAGE.into()),
    };
    let fourcc = match args.get(2) {
        Some(code) => parse_fourcc(code).ok_or_else(|| format!("bad FOURCC {code:?}"))?,
        None => FOURCC_MJPG,
    };

    let backend = FfmpegBackend::from_env();
    if !backend.is_available() {
        return Err("ffmpeg backend unavailable, set VIDEOIO_FFMPEG_PLUGIN".into());
    }

    let mut capture =
        create_file_capture(&backend, input).ok_or_else(|| format!("cannot open {input}"))?;
    let fps = match args.get(3) {
        Some(fps) => fps.parse::<f64>()?,
        None => match capture.get_property(CAP_PROP_FPS) {
            fps if fps > 0.0 => fps,
            _ => 25.0,
        },
    };

    // the first frame decides the output size
    let mut frame = Image::default();
    if !capture.read(&mut frame) {
        return Err(format!("{input} has no frames").into());
    }
    let size = Vec2::new(frame.width(), frame.height());
    log::info!("{input}: {size} at {fps} fps via {}", capture.capture_domain());

    let mut writer = create_video_writer(&backend, output, fourcc, fps, size, frame.channels() > 1)
        .ok_or_else(|| format!("cannot open {output} for writing"))?;

    let mut count = 0usize;
    loop {
        writer.write(&frame);
        count += 1;
        if !capture.read(&mut frame) {
            break;
        }
    }
    log::info!("copied {count} frames to {output}");
    Ok(())
}
