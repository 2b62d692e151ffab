use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use indicatif::{ProgressBar, ProgressStyle};

use dub_retime::{
    ClipSource, LinearTimeStretcher, RetimeConfig, RetimeError, SlotTimeline, TimeStretcher,
    TrackAssemblerBuilder,
};

/// Re-times per-segment TTS audio onto original subtitle timings and writes
/// one aligned WAV track.
#[derive(Parser, Debug)]
struct Args {
    /// Translations JSONL with timing info.
    #[arg(long)]
    jsonl: PathBuf,

    /// Directory containing per-segment WAV files (seg_0001.wav, ...).
    #[arg(long)]
    segments_dir: PathBuf,

    /// Original full audio file, used for total duration and the default
    /// output sample rate.
    #[arg(long)]
    orig_audio: PathBuf,

    /// Path for the final aligned WAV.
    #[arg(long)]
    out_wav: PathBuf,

    /// Target output sample rate in Hz; defaults to the original audio's rate.
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Only process the first N segments.
    #[arg(long)]
    max_segments: Option<usize>,

    /// Skip time-stretching when the relative duration difference is at or
    /// below this fraction.
    #[arg(long, default_value_t = RetimeConfig::DEFAULT_MAX_REL_STRETCH)]
    max_rel_stretch: f64,

    /// Skip time-stretching when the absolute duration difference is at or
    /// below this many seconds.
    #[arg(long, default_value_t = RetimeConfig::DEFAULT_MAX_ABS_STRETCH_SEC)]
    max_abs_stretch: f64,
}

/// Looks up `seg_%04d.wav` clips in a directory, resampling to the target
/// rate when a file was rendered at a different one.
struct WavDirClipSource {
    dir: PathBuf,
    sample_rate_hz: u32,
    progress: ProgressBar,
}

impl ClipSource for WavDirClipSource {
    fn fetch(&self, index: u32) -> Result<Option<Vec<f32>>, RetimeError> {
        self.progress.inc(1);
        let path = self.dir.join(format!("seg_{index:04}.wav"));
        if !path.exists() {
            return Ok(None);
        }
        let (samples, file_rate) =
            read_wav_mono(&path).map_err(|e| RetimeError::runtime("decode segment wav", e))?;
        if file_rate == self.sample_rate_hz {
            return Ok(Some(samples));
        }
        let resampled = LinearTimeStretcher.stretch(
            &samples,
            file_rate as f64 / self.sample_rate_hz as f64,
        );
        Ok(Some(resampled))
    }
}

fn read_wav_mono(path: &Path) -> Result<(Vec<f32>, u32), hound::Error> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };
    let channels = spec.channels as usize;
    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };
    Ok((mono, spec.sample_rate))
}

fn write_wav_mono(path: &Path, samples: &[f32], sample_rate_hz: u32) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: sample_rate_hz,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

fn init_logging() {
    let env_filter = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args = Args::parse();

    let (orig_samples, orig_rate) = read_wav_mono(&args.orig_audio)?;
    let sample_rate_hz = args.sample_rate.unwrap_or(orig_rate);
    let total_samples =
        (orig_samples.len() as f64 * sample_rate_hz as f64 / orig_rate as f64).round() as usize;
    tracing::info!(
        orig_duration_sec = format!("{:.3}", orig_samples.len() as f64 / orig_rate as f64),
        sample_rate_hz,
        total_samples,
        "loaded original audio"
    );

    let jsonl_text = fs::read_to_string(&args.jsonl)
        .map_err(|e| RetimeError::io("read timing jsonl", e))?;
    let records = SlotTimeline::parse_jsonl(&jsonl_text)?;
    let slots = SlotTimeline::build_truncated(&records, sample_rate_hz, args.max_segments)?;
    tracing::info!(
        records = records.len(),
        slots = slots.len(),
        "resolved slot timeline"
    );

    let config = RetimeConfig {
        sample_rate_hz,
        max_rel_stretch: args.max_rel_stretch,
        max_abs_stretch_sec: args.max_abs_stretch,
        ..RetimeConfig::default()
    };
    let assembler = TrackAssemblerBuilder::new(config).build()?;

    let progress = ProgressBar::new(slots.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    let clips = WavDirClipSource {
        dir: args.segments_dir.clone(),
        sample_rate_hz,
        progress: progress.clone(),
    };

    let (track, report) = assembler.assemble(&slots, &clips, total_samples);
    progress.finish_and_clear();
    tracing::info!(
        duration_sec = format!("{:.3}", track.duration_sec()),
        stretched = report.stretched(),
        missing = report.missing_clips(),
        "assembly finished"
    );

    if let Some(parent) = args.out_wav.parent() {
        fs::create_dir_all(parent).map_err(|e| RetimeError::io("create output directory", e))?;
    }
    write_wav_mono(&args.out_wav, track.samples(), sample_rate_hz)?;
    tracing::info!(path = %args.out_wav.display(), "saved aligned track");
    Ok(())
}
