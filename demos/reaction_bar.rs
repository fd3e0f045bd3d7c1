use tapback::prelude::*;

fn main() -> Result<(), tapback::renderer::RenderError> {
    env_logger::init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "reaction_frames".to_string());

    // Tap script: (frame time, reaction)
    let taps = [
        (0.25, Reaction::Heart),
        (1.5, Reaction::Clap),
        (2.0, Reaction::Thumb),
        // Restarts the clap mid-bounce
        (2.3, Reaction::Clap),
    ];
    let mut next_tap = 0;

    let summary = App::new()
        .frame_rate(60)
        .duration_secs(5.0)
        .scale_factor(2.0)
        .output_dir(&output)
        .on_update(move |bar, now| {
            while let Some(&(at, reaction)) = taps.get(next_tap) {
                if now < at {
                    break;
                }
                bar.tap(reaction);
                next_tap += 1;
            }
        })
        .run()?;

    println!(
        "Wrote {} of {} frames to {}",
        summary.exported.len(),
        summary.frames,
        output
    );
    Ok(())
}
