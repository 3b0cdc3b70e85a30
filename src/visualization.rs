use crate::location::Location;
use plotters::prelude::*;
use std::error::Error;

/// Draws the locations and the best route's polyline to a PNG file.
/// `path` holds 0-based indices into `locations` in visiting order.
pub fn visualize_route(
    locations: &[Location],
    path: &[usize],
    cost: f64,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    // Create a drawing area for the chart.
    let root = BitMapBackend::new(output_path, (1200, 1200)).into_drawing_area();
    root.fill(&WHITE)?;

    // Determine the coordinate range with a small margin around it.
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for location in locations {
        min_x = min_x.min(location.x);
        max_x = max_x.max(location.x);
        min_y = min_y.min(location.y);
        max_y = max_y.max(location.y);
    }
    let pad_x = ((max_x - min_x) * 0.05).max(1.0);
    let pad_y = ((max_y - min_y) * 0.05).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Best route, cost {:.2}", cost), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(min_x - pad_x..max_x + pad_x, min_y - pad_y..max_y + pad_y)?;

    chart
        .configure_mesh()
        .x_desc("X")
        .y_desc("Y")
        .x_labels(10)
        .y_labels(10)
        .draw()?;

    // Draw the route as one polyline through the visited locations.
    chart
        .draw_series(LineSeries::new(
            path.iter().map(|&i| (locations[i].x, locations[i].y)),
            BLUE.stroke_width(2),
        ))?
        .label("route")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], BLUE.stroke_width(2)));

    // Draw each location as a labeled point.
    chart.draw_series(locations.iter().map(|location| {
        Circle::new((location.x, location.y), 4, RED.filled())
    }))?;
    chart.draw_series(locations.iter().map(|location| {
        Text::new(
            format!("{}", location.id),
            (location.x, location.y),
            ("sans-serif", 14),
        )
    }))?;

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .draw()?;

    // Save the result to the specified output path.
    root.present()?;
    Ok(())
}
