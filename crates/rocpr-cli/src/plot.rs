// crates/rocpr-cli/src/plot.rs

//! Curve data dumps and the gnuplot script emitter.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use rocpr_stats::Histogram;

/// Write every bucket of `hist` as `x<TAB>y` lines, interpolated where the
/// stat stream left a bucket empty.
pub fn write_curve_tsv(path: &Path, hist: &Histogram) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    for bucket in 0..hist.buckets() {
        writeln!(w, "{}\t{}", hist.bucket_x(bucket), hist.sample(bucket))
            .with_context(|| format!("write {}", path.display()))?;
    }
    w.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

/// Emit a gnuplot script rendering both curves side by side.
pub fn write_plot_script(path: &Path, roc_data: &Path, pr_data: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    writeln!(w, "set terminal pngcairo size 1000,420")?;
    writeln!(w, "set output 'curves.png'")?;
    writeln!(w, "set multiplot layout 1,2")?;
    writeln!(w, "set key bottom right")?;
    writeln!(w, "set xrange [0:1]")?;
    writeln!(w, "set yrange [0:1]")?;
    writeln!(w, "set title 'ROC'")?;
    writeln!(w, "set xlabel 'false positive rate'")?;
    writeln!(w, "set ylabel 'true positive rate'")?;
    writeln!(
        w,
        "plot '{}' using 1:2 with lines title 'classifier', x with lines dashtype 2 title 'chance'",
        roc_data.display()
    )?;
    writeln!(w, "set title 'Precision/Recall'")?;
    writeln!(w, "set xlabel 'recall'")?;
    writeln!(w, "set ylabel 'precision'")?;
    writeln!(
        w,
        "plot '{}' using 1:2 with lines title 'classifier'",
        pr_data.display()
    )?;
    writeln!(w, "unset multiplot")?;

    w.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
