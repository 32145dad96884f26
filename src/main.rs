use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use image::RgbaImage;
use log::{info, warn};
use serde::Serialize;

use jjrender::error::Result;
use jjrender::events::EventResolver;
use jjrender::formats::anims::AnimLibrary;
use jjrender::formats::legacy::{LegacyBlocks, LegacyLevel, LegacyPlanet};
use jjrender::formats::level::Level;
use jjrender::formats::tileset::Tileset;
use jjrender::palette::Palette;
use jjrender::render;
use jjrender::render::LevelRenderer;

/// Render previews of Jazz Jackrabbit game files.
#[derive(Parser)]
#[command(name = "jjrender", version)]
struct Args {
    /// Game file to render: .j2a, .j2t, .j2l, BLOCKS.nnn, LEVEL.nnn or
    /// PLANET.nnn
    input: PathBuf,

    /// Output path; defaults to the input with a .png extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a JSON summary of the parsed file next to the image
    #[arg(long)]
    info: bool,
}

enum FileKind {
    Anims,
    Tileset,
    Level,
    Blocks,
    LegacyLevel,
    Planet,
}

/// What `--info` writes next to the rendered image.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Summary {
    AnimationLibrary {
        version: u16,
        sets: usize,
    },
    Tileset {
        name: String,
        version: u16,
        tiles: usize,
    },
    Level {
        title: String,
        version: u16,
        tileset: String,
        music: String,
        next_level: String,
        multiplayer: bool,
        size: [u32; 2],
    },
    LegacyTileset {
        tiles: usize,
    },
    LegacyLevel {
        level: u8,
        world: u8,
        blocks: String,
    },
    Planet {
        name: String,
    },
}

/// Picks a format from the file name. Episode-1 files carry a
/// three-digit episode number as their extension and are told apart by
/// name; everything else goes by extension.
fn classify(path: &Path) -> Option<FileKind> {
    let name = path.file_name()?.to_string_lossy().to_lowercase();
    let (stem, extension) = name.rsplit_once('.')?;
    if extension.len() == 3 && extension.bytes().all(|b| b.is_ascii_digit()) {
        return if stem.starts_with("blocks") {
            Some(FileKind::Blocks)
        } else if stem.starts_with("level") {
            Some(FileKind::LegacyLevel)
        } else if stem.starts_with("planet") {
            Some(FileKind::Planet)
        } else {
            None
        };
    }
    match extension {
        "j2a" => Some(FileKind::Anims),
        "j2t" => Some(FileKind::Tileset),
        "j2l" => Some(FileKind::Level),
        _ => None,
    }
}

/// Finds a directory entry whose name matches case-insensitively.
fn find_adjacent(dir: &Path, name: &str) -> io::Result<PathBuf> {
    let wanted = name.to_lowercase();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().to_lowercase() == wanted {
            return Ok(entry.path());
        }
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no file named {} in {}", name, dir.display()),
    ))
}

/// The shipped game palette, used for animation libraries, which carry
/// no palette of their own.
fn game_palette(dir: &Path) -> Result<Palette> {
    let path = find_adjacent(dir, "Jazz2.pal")?;
    Ok(Palette::from_jasc(&fs::read_to_string(path)?)?)
}

fn save_png(image: &RgbaImage, path: &Path) -> io::Result<()> {
    let temp_path = path.with_extension("temp.png");
    image
        .save(&temp_path)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let mut options = oxipng::Options::from_preset(2);
    options.bit_depth_reduction = true;
    options.interlace = None;

    match oxipng::optimize(
        &oxipng::InFile::Path(temp_path.clone()),
        &oxipng::OutFile::Path(Some(path.to_path_buf())),
        &options,
    ) {
        Ok(_) => {
            let _ = fs::remove_file(temp_path);
            Ok(())
        }
        Err(e) => {
            fs::rename(temp_path, path)?;
            warn!(
                "oxipng optimisation failed for {}: {}. File saved unoptimised.",
                path.display(),
                e
            );
            Ok(())
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let dir = args
        .input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    let kind = classify(&args.input).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unsupported file type: {}", args.input.display()),
        )
    })?;
    let data = fs::read(&args.input)?;

    let (image, summary) = match kind {
        FileKind::Anims => {
            let library = AnimLibrary::parse(data)?;
            let palette = game_palette(&dir)?;
            let image = render::anims::library_preview(&library, &palette)?;
            let summary = Summary::AnimationLibrary {
                version: library.version,
                sets: library.set_count(),
            };
            (image, summary)
        }
        FileKind::Tileset => {
            let tileset = Tileset::parse(data)?;
            let image = render::tileset::tileset_preview(&tileset)?;
            let summary = Summary::Tileset {
                name: tileset.name.clone(),
                version: tileset.version,
                tiles: tileset.tile_count,
            };
            (image, summary)
        }
        FileKind::Level => {
            let level = Level::parse(data)?;
            let tileset_path = find_adjacent(&dir, &level.tileset_file)?;
            let tileset = Tileset::parse(fs::read(tileset_path)?)?;
            let events = EventResolver::new(tileset.palette.clone(), &dir);
            let renderer = LevelRenderer::new(&level, &tileset, &events)?;
            let image = renderer.preview()?;
            let summary = Summary::Level {
                title: level.title.clone(),
                version: level.version,
                tileset: level.tileset_file.clone(),
                music: level.music_file.clone(),
                next_level: level.next_level.clone(),
                multiplayer: level.is_multiplayer,
                size: [level.sprite_layer().width, level.sprite_layer().height],
            };
            (image, summary)
        }
        FileKind::Blocks => {
            let blocks = LegacyBlocks::parse(data)?;
            let image = render::legacy::blocks_preview(&blocks)?;
            let summary = Summary::LegacyTileset {
                tiles: blocks.tile_count,
            };
            (image, summary)
        }
        FileKind::LegacyLevel => {
            let level = LegacyLevel::parse(data)?;
            let blocks_name = format!("BLOCKS.{}", level.blocks_number);
            let blocks_path = find_adjacent(&dir, &blocks_name)?;
            let blocks = LegacyBlocks::parse(fs::read(blocks_path)?)?;
            let image = render::legacy::level_image(&level, &blocks)?;
            let summary = Summary::LegacyLevel {
                level: level.level_number,
                world: level.world_number,
                blocks: level.blocks_number.clone(),
            };
            (image, summary)
        }
        FileKind::Planet => {
            let planet = LegacyPlanet::parse(data)?;
            let image = render::legacy::planet_image(&planet);
            let summary = Summary::Planet {
                name: planet.name.clone(),
            };
            (image, summary)
        }
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("png"));
    save_png(&image, &output)?;
    info!("wrote {}", output.display());

    if args.info {
        let info_path = output.with_extension("json");
        let file = fs::File::create(&info_path)?;
        serde_json::to_writer_pretty(file, &summary)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        info!("wrote {}", info_path.display());
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{}: {}", args.input.display(), e);
        std::process::exit(1);
    }
}
