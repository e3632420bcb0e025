use anyhow::{Context, Result};
use exception_bridge::{Exception, catch, try_run};

/// A toy audio graph that, like `AVAudioEngine`, raises instead of returning
/// errors when it is misused.
struct Graph {
    nodes: Vec<&'static str>,
    running: bool,
}

impl Graph {
    fn new() -> Self {
        Graph {
            nodes: vec!["input", "mixer", "output"],
            running: false,
        }
    }

    fn connect(&self, from: &str, to: &str) {
        for node in [from, to] {
            if !self.nodes.iter().any(|n| *n == node) {
                Exception::new(
                    "NSInvalidArgumentException",
                    format!("node '{node}' is not attached to the graph"),
                )
                .raise();
            }
        }
    }

    fn start(&mut self) {
        if self.running {
            Exception::without_reason("NSInternalInconsistencyException").raise();
        }
        self.running = true;
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut graph = Graph::new();

    try_run(|| graph.connect("input", "mixer")).context("connecting input")?;
    println!("input -> mixer connected");

    match try_run(|| graph.connect("mixer", "reverb")) {
        Ok(()) => println!("mixer -> reverb connected"),
        Err(e) => println!("mixer -> reverb failed: {e}"),
    }

    let started = catch(std::panic::AssertUnwindSafe(|| {
        graph.start();
        graph.nodes.len()
    }))?;
    println!("graph started with {started} nodes");

    if let Err(e) = try_run(std::panic::AssertUnwindSafe(|| graph.start())) {
        println!("second start failed: {e} (domain {}, code {})", e.domain(), e.code());
    }

    #[cfg(any(target_os = "macos", target_os = "ios"))]
    {
        use exception_bridge::platform::apple::ext::AppleErrorDescriptionExt;
        use exception_bridge::platform::apple::raise_ns_exception;

        let err = try_run(|| unsafe {
            raise_ns_exception(
                "com.apple.coreaudio.avfaudio",
                Some("required condition is false: IsFormatSampleRateAndChannelCountValid(format)"),
            )
        })
        .expect_err("raised exceptions are always intercepted");
        println!("Objective-C exception as NSError: {:?}", err.to_ns_error());
    }

    Ok(())
}
