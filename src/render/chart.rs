use serde_json::{json, Value};

pub const DOWNLOAD_SERIES: &str = "Download Speed (MB/s)";
pub const UPLOAD_SERIES: &str = "Upload Speed (MB/s)";

const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";

/// Plotly figure for the speed history, both series over the full retained window
pub fn speed_figure(download: &[f64], upload: &[f64]) -> Value {
    json!({
        "data": [
            line_trace(download, DOWNLOAD_SERIES, "orange"),
            line_trace(upload, UPLOAD_SERIES, "teal"),
        ],
        "layout": {
            "title": { "text": "Download & Upload Speeds" },
            "paper_bgcolor": TRANSPARENT,
            "plot_bgcolor": TRANSPARENT,
            "font": { "color": "#FFFFFF" },
            "legend": {
                "bgcolor": TRANSPARENT,
                "bordercolor": TRANSPARENT,
                "orientation": "h",
                "yanchor": "top",
                "y": -0.2,
                "xanchor": "center",
                "x": 0.5
            },
            "xaxis": {
                "title": { "text": "Time (Intervals)" },
                "showline": false,
                "showgrid": false,
                "zeroline": false,
                "showticklabels": false
            },
            "yaxis": {
                "title": { "text": "Speed (MB/s)" },
                "showline": false,
                "showgrid": false,
                "zeroline": false
            },
            "hovermode": "x unified"
        }
    })
}

fn line_trace(samples: &[f64], name: &str, color: &str) -> Value {
    json!({
        "y": samples,
        "type": "scatter",
        "mode": "lines",
        "name": name,
        "line": { "color": color, "width": 2 }
    })
}
