// demos/basic_usage.rs
//! Basic usage example for Filter Core

use filter_core::{
    hpf_gain, lowpass_2nd, lpf_gain, normalize_to_unity_gain_lpf, notch_2nd, BoolFilter,
    ConfigLoader, ConfiguredFilter, CrFilter, FirFilter, IirFilter, RcFilter,
};

const FS: f32 = 1000.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Filter Core Basic Usage Example");
    println!("===============================");

    // First-order cascades
    println!("\nRC low-pass step response (fc = 10 Hz, order 2)...");
    let mut rc = RcFilter::new(10.0, FS, 2, 0.0)?;
    for n in 0..200 {
        let y = rc.handle(1.0);
        if n % 40 == 0 {
            println!("  n={:3}  y={:.4}", n, y);
        }
    }

    println!("\nCR high-pass removing a DC offset...");
    let mut cr = CrFilter::new(1.0, FS, 1)?;
    let mut y = 0.0;
    for _ in 0..2000 {
        y = cr.handle(2.5);
    }
    println!("  output after 2 s of constant 2.5: {:.5}", y);

    // FIR moving average
    println!("\nFIR 4-tap moving average...");
    let mut fir = FirFilter::new(&[0.25; 4], 0.0)?;
    for x in [4.0, 4.0, 4.0, 4.0, 0.0] {
        println!("  in={:.1}  out={:.2}", x, fir.handle(x));
    }

    // Biquad design and gain analysis
    println!("\nBiquad design...");
    let lp = lowpass_2nd(100.0, 0.707, FS)?;
    println!("  low-pass  DC gain={:.4}  Nyquist gain={:.4}", lpf_gain(&lp), hpf_gain(&lp));

    let mut notch = notch_2nd(50.0, 0.9, FS)?;
    let raw_gain = normalize_to_unity_gain_lpf(&mut notch);
    println!("  notch     DC gain {:.4} -> {:.4}", raw_gain, lpf_gain(&notch));

    let mut mains = IirFilter::new(&notch)?;
    let mut peak: f32 = 0.0;
    for n in 0..2000 {
        let t = n as f32 / FS;
        let hum = (2.0 * std::f32::consts::PI * 50.0 * t).sin();
        let y = mains.handle(hum);
        if n >= 1000 {
            peak = peak.max(y.abs());
        }
    }
    println!("  50 Hz hum peak after notch: {:.4}", peak);

    // Boolean debounce
    println!("\nBoolean debounce of a chattering contact...");
    let mut gate = BoolFilter::new(20.0, FS, 0.1)?;
    let contact = [true, false, true, false, true, true, true, true, true, true];
    let mut transitions = 0;
    let mut previous = false;
    for _ in 0..10 {
        for &x in &contact {
            let out = gate.handle(x);
            if out != previous {
                transitions += 1;
                previous = out;
            }
        }
    }
    println!("  output={}  level={:.3}  transitions={}", gate.output(), gate.level(), transitions);

    // Declarative filter bank
    println!("\nLoading a filter bank from TOML...");
    let bank = ConfigLoader::from_toml_str(
        r#"
        [[filters]]
        name = "envelope"
        kind = "rc"
        fc = 5.0
        fs = 1000.0
        order = 3

        [[filters]]
        name = "anti_alias"
        kind = "biquad"
        response = "lowpass"
        fc = 200.0
        fs = 1000.0
        normalize = true
        "#,
    )?;

    for (name, filter) in ConfigLoader::build_all(&bank)? {
        let detail = match &filter {
            ConfiguredFilter::Rc(f) => format!("order {}", f.order()),
            ConfiguredFilter::Iir(f) => format!("{} poles, {} zeros", f.num_pole(), f.num_zero()),
            _ => String::new(),
        };
        println!("  {:<12} {:<8} {}", name, filter.kind().to_string(), detail);
    }

    println!("\nExample completed successfully!");
    Ok(())
}
