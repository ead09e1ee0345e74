//! Generates an icosphere and reports its buffer sizes
//!
//! Run with:
//!   cargo run --example icosphere_stats
//!   cargo run --example icosphere_stats -- --subdivisions 5 --index-format u16
//!   RUST_LOG=debug cargo run --example icosphere_stats -- --dedup

use clap::Parser;
use icosphere::{
    checked_subdivisions, ConstantInput, IcosphereBuilder, IndexFormat, InstanceInput, MeshResult,
    VertexInput,
};

/// Index width selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
enum CliIndexFormat {
    /// 16-bit indices (up to 65536 vertices)
    U16,
    /// 32-bit indices
    #[default]
    U32,
}

impl From<CliIndexFormat> for IndexFormat {
    fn from(format: CliIndexFormat) -> Self {
        match format {
            CliIndexFormat::U16 => IndexFormat::Uint16,
            CliIndexFormat::U32 => IndexFormat::Uint32,
        }
    }
}

/// Icosphere statistics.
#[derive(Parser, Debug)]
#[command(
    name = "icosphere_stats",
    about = "Generate an icosphere and report vertex, index and shader input sizes",
    version
)]
struct Args {
    /// Number of subdivision rounds applied to the icosahedron.
    #[arg(long, default_value = "3", allow_negative_numbers = true)]
    subdivisions: i64,

    /// Index width the mesh must fit.
    #[arg(long, default_value = "u32", value_enum)]
    index_format: CliIndexFormat,

    /// Share edge midpoints between adjacent triangles.
    #[arg(long)]
    dedup: bool,

    /// Mesh name used in log output.
    #[arg(long, default_value = "icosphere")]
    label: String,
}

fn run(args: &Args) -> MeshResult<()> {
    let builder = IcosphereBuilder::new()
        .with_subdivisions(checked_subdivisions(args.subdivisions)?)
        .with_index_format(args.index_format.into())
        .with_deduplication(args.dedup)
        .with_label(args.label.as_str());

    let mesh = builder.build()?;
    mesh.validate()?;
    let index_data = mesh.index_data()?;

    log::info!(
        "{}: {} vertices, {} triangles ({} subdivisions, deduplicated: {})",
        mesh.name(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        builder.subdivisions(),
        builder.deduplicate()
    );
    log::info!(
        "vertex buffer: {} bytes (stride {}), index buffer: {} bytes ({:?})",
        mesh.vertex_bytes().len(),
        VertexInput::layout().array_stride,
        index_data.len(),
        mesh.index_format()
    );
    log::info!(
        "shader inputs: ConstantInput {} bytes, InstanceInput {} bytes, VertexInput {} bytes",
        std::mem::size_of::<ConstantInput>(),
        std::mem::size_of::<InstanceInput>(),
        std::mem::size_of::<VertexInput>()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
