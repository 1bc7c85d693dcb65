//! 导航演示：读取路由清单，依次导航到命令行给出的路由，并打印页面表面的变化。
//!
//! # 使用方法
//! ```bash
//! WAYPOINT_ENV=development cargo run --bin navigate -- \
//!     --manifest crates/waypoint-examples/config/dev-routes.toml --latency-ms 800 dev-form home
//! ```
//! - `--manifest`：可选，缺省使用随 crate 提供的 `config/dev-routes.toml`；
//! - `--latency-ms`：可选，每次导航模拟的视图加载耗时，缺省 100ms；
//! - 其余参数为依次导航的路由名，缺省导航到清单中的全部路由。
//!
//! `WAYPOINT_ENV` 为 `development`/`dev` 时启用加载指示器与诊断日志。

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context as _, bail};
use tracing::info;
use waypoint_core::{DepthFirst, RouteManifest, RuntimeProfile, ThreadTimer};
use waypoint_examples::{HostSimulator, install_logging};
use waypoint_router::{RecordingSurface, SurfaceEvent};

const DEFAULT_LATENCY_MS: u64 = 100;
const RUNTIME_VAR: &str = "WAYPOINT_ENV";

struct Options {
    manifest: PathBuf,
    latency: Duration,
    routes: Vec<String>,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("导航演示失败: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    install_logging()?;
    let options = parse_args(env::args().skip(1))?;

    let manifest = RouteManifest::from_path(&options.manifest)
        .with_context(|| format!("无法加载清单 {}", options.manifest.display()))?;
    let routes = if options.routes.is_empty() {
        DepthFirst::new(&manifest.routes)
            .map(|node| node.name.clone())
            .collect()
    } else {
        options.routes
    };

    let runtime = RuntimeProfile::from_env(RUNTIME_VAR);
    info!(?runtime, manifest = %options.manifest.display(), "starting navigation demo");

    let surface = Arc::new(RecordingSurface::new());
    let mut host = HostSimulator::from_manifest(
        manifest,
        surface.clone(),
        Arc::new(runtime),
        Arc::new(ThreadTimer::new()),
    );

    for name in &routes {
        let before = surface.events().len();
        let outcome = host.navigate(name, || thread::sleep(options.latency))?;
        println!(
            "{} -> {}",
            outcome.route,
            outcome.title.as_deref().unwrap_or("<untitled>")
        );
        for event in surface.events().into_iter().skip(before) {
            match event {
                SurfaceEvent::Title(title) => println!("  title      = {title}"),
                SurfaceEvent::Visibility { element, visible } => {
                    println!("  visibility = {element}:{visible}")
                }
            }
        }
    }

    let keep_alive = host.lifecycle().context().keep_alive().names();
    println!("keep-alive: {keep_alive:?}");
    for tag in host.lifecycle().context().tags().tags() {
        println!("tag: {} ({})", tag.name, tag.path);
    }
    Ok(())
}

fn parse_args(args: impl Iterator<Item = String>) -> anyhow::Result<Options> {
    let mut options = Options {
        manifest: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/dev-routes.toml"),
        latency: Duration::from_millis(DEFAULT_LATENCY_MS),
        routes: Vec::new(),
    };

    let mut args = args;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--manifest" => {
                let value = args.next().context("--manifest 之后必须提供文件路径")?;
                options.manifest = PathBuf::from(value);
            }
            "--latency-ms" => {
                let value = args.next().context("--latency-ms 之后必须提供毫秒数")?;
                let millis: u64 = value
                    .parse()
                    .with_context(|| format!("无效的毫秒数: {value}"))?;
                options.latency = Duration::from_millis(millis);
            }
            flag if flag.starts_with("--") => bail!("未知参数: {flag}"),
            _ => options.routes.push(arg),
        }
    }
    Ok(options)
}
