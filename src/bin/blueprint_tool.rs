use anyhow::{anyhow, bail, Context, Result};
use blueprint_planes::discovery;
use blueprint_planes::scene_graph::MemoryScene;
use blueprint_planes::{BlueprintConfig, PlacementEngine, ViewDirection, COLLECTION_NAME};
use std::env;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:?}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_usage();
        return Ok(());
    };
    match command.as_str() {
        "scan" => {
            let image = args
                .next()
                .ok_or_else(|| anyhow!("scan requires a path: blueprint_tool scan <image>"))?;
            cmd_scan(Path::new(&image))
        }
        "place" => {
            let image = args
                .next()
                .ok_or_else(|| anyhow!("place requires a path: blueprint_tool place <image> [flags]"))?;
            let config = parse_place_flags(PathBuf::from(image), args)?;
            cmd_place(&config)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(anyhow!("unknown command '{other}'")),
    }
}

fn print_usage() {
    eprintln!(
        "Blueprint Tool

Usage:
  blueprint_tool scan <image>    Resolve the sibling view images of <image>
  blueprint_tool place <image>   Run a full placement into an in-memory scene
      [--size <f32>] [--opacity <f32>] [--use-opacity on|off]
      [--swap-xy on|off] [--switch-x on|off] [--switch-y on|off]
      [--clear-previous on|off]
  blueprint_tool help            Show this message
"
    );
}

fn parse_place_flags<I>(image: PathBuf, args: I) -> Result<BlueprintConfig>
where
    I: Iterator<Item = String>,
{
    let mut config = BlueprintConfig { main_image: image, ..BlueprintConfig::default() };
    let mut iter = args;
    while let Some(flag) = iter.next() {
        if !flag.starts_with("--") {
            bail!("unexpected argument '{flag}'");
        }
        let value = iter.next().ok_or_else(|| anyhow!("expected a value after '{flag}'"))?;
        match &flag[2..] {
            "size" => {
                config.display.size =
                    value.parse::<f32>().with_context(|| format!("invalid size '{value}'"))?;
            }
            "opacity" => {
                config.display.opacity =
                    value.parse::<f32>().with_context(|| format!("invalid opacity '{value}'"))?;
            }
            "use-opacity" => config.display.use_opacity = parse_bool_flag("use-opacity", &value)?,
            "swap-xy" => config.remap.swap_xy = parse_bool_flag("swap-xy", &value)?,
            "switch-x" => config.remap.switch_x = parse_bool_flag("switch-x", &value)?,
            "switch-y" => config.remap.switch_y = parse_bool_flag("switch-y", &value)?,
            "clear-previous" => config.clear_previous = parse_bool_flag("clear-previous", &value)?,
            _ => bail!("unknown flag '{flag}'"),
        }
    }
    Ok(config)
}

fn parse_bool_flag(flag: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => bail!("invalid {flag} value '{other}'. Use on/off or true/false."),
    }
}

fn cmd_scan(image: &Path) -> Result<()> {
    let trigger = discovery::resolve_absolute(image);
    if !trigger.exists() {
        bail!("image '{}' does not exist", trigger.display());
    }
    let token = discovery::base_token(&trigger);
    let directory = trigger.parent().ok_or_else(|| anyhow!("image path has no parent directory"))?;
    println!("base '{}'", token.base);
    for view in ViewDirection::ALL {
        let resolved = if token.view == Some(view) {
            Some(trigger.clone())
        } else {
            discovery::find_view_image(directory, &token.base, view)
        };
        match resolved {
            Some(path) => println!("  {:<7} {}", view.label(), path.display()),
            None => println!("  {:<7} -", view.label()),
        }
    }
    Ok(())
}

fn cmd_place(config: &BlueprintConfig) -> Result<()> {
    let mut scene = MemoryScene::new();
    let mut engine = PlacementEngine::new();
    let report = engine.run_full_placement(&mut scene, config);
    for status in &report.messages {
        println!("[{}] {}", status.kind.label(), status.message);
    }
    for (view, path) in engine.slots().assigned() {
        println!("  {:<7} {}", view.label(), path.display());
    }
    if scene.empty_count() > 0 {
        println!("collection '{COLLECTION_NAME}':");
    }
    for (_, empty) in scene.empties() {
        let rotation = empty.rotation;
        let image = empty
            .image
            .and_then(|id| scene.image(id))
            .map(|asset| format!("{}x{}", asset.width, asset.height))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<24} rot ({:>6.1}, {:>6.1}, {:>6.1}) deg  size {:.2}  image {}",
            empty.name,
            rotation.x.to_degrees(),
            rotation.y.to_degrees(),
            rotation.z.to_degrees(),
            empty.display_size,
            image
        );
    }
    if report.has_errors() {
        return Err(anyhow!("placement reported errors"));
    }
    Ok(())
}
