// tests/tick_formatting_test.rs

use figstyle::ticks::{MajorLocator, TickFormatter};
use figstyle::{decimal_places_y, fix_plot, AxisKind, Figure};

fn labels_for(step: f64, lo: f64, hi: f64, formatter: TickFormatter) -> Vec<String> {
    MajorLocator::Multiple(step)
        .ticks(lo, hi)
        .into_iter()
        .map(|v| formatter.format(v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_labels_hide_float_noise() {
        // 3 * 0.2 is 0.6000000000000001 in binary floating point.
        let labels = labels_for(0.2, 0.0, 1.2, TickFormatter::Auto);
        assert_eq!(labels, ["0", "0.2", "0.4", "0.6", "0.8", "1", "1.2"]);
    }

    #[test]
    fn test_auto_labels_never_show_negative_zero() {
        let labels = labels_for(0.5, -1.0, 1.0, TickFormatter::Auto);
        assert_eq!(labels, ["-1", "-0.5", "0", "0.5", "1"]);
    }

    #[test]
    fn test_fixed_decimals() {
        let labels = labels_for(2.5, -5.0, 5.0, TickFormatter::Decimals(1));
        assert_eq!(labels, ["-5.0", "-2.5", "0.0", "2.5", "5.0"]);

        let labels = labels_for(3.0, -9.0, 9.0, TickFormatter::Decimals(0));
        assert_eq!(labels, ["-9", "-6", "-3", "0", "3", "6", "9"]);
    }

    #[test]
    fn test_decimal_places_installed_on_axes() {
        let mut fig = Figure::new(&fix_plot(8.0, 8.0));
        decimal_places_y(fig.ax(), 2);
        let ax = fig.ax();
        assert_eq!(ax.axis(AxisKind::Y).formatter, TickFormatter::Decimals(2));
        assert_eq!(ax.axis(AxisKind::X).formatter, TickFormatter::Auto);
        assert_eq!(ax.axis(AxisKind::Y).formatter.format(-0.001), "0.00");
    }
}
