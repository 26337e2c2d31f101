//! Dashboard API endpoint

use api_types::dashboard::{
    ActivityShare, ApplicationMeans, Dashboard, DoctorRanking, Report, ScatterPoint,
    SeriesPoint, StackedSeries, StateSeries, Summary,
};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

fn map_report<T, U>(report: engine::Report<T>, map: impl FnOnce(T) -> U) -> Report<U> {
    match report {
        engine::Report::NoData => Report::NoData,
        engine::Report::Data(data) => Report::Data(map(data)),
    }
}

fn map_rows<T, U>(report: engine::Report<Vec<T>>, map: impl FnMut(T) -> U) -> Report<Vec<U>> {
    map_report(report, |rows| rows.into_iter().map(map).collect())
}

fn map_series(series: engine::StateSeries) -> StateSeries {
    StateSeries {
        state: series.state,
        points: series
            .points
            .into_iter()
            .map(|point| SeriesPoint {
                field_of_activity: point.field_of_activity,
                mean_sales: point.mean_sales,
            })
            .collect(),
    }
}

fn map_dashboard(dashboard: engine::Dashboard) -> Dashboard {
    Dashboard {
        application_means: map_rows(dashboard.application_means, |row| ApplicationMeans {
            application: row.application,
            mean_sales: row.mean_sales,
            mean_profit: row.mean_profit,
            mean_quantity: row.mean_quantity,
        }),
        activity_share: map_rows(dashboard.activity_share, |row| ActivityShare {
            field_of_activity: row.field_of_activity,
            total_sales: row.total_sales,
            share: row.share,
        }),
        top_doctors: map_rows(dashboard.top_doctors, |row| DoctorRanking {
            doctor_name: row.doctor_name,
            mean_sales: row.mean_sales,
        }),
        product_scatter: map_rows(dashboard.product_scatter, |point| ScatterPoint {
            product_name: point.product_name,
            discount: point.discount,
            profit: point.profit,
            quantity: point.quantity,
        }),
        state_series: map_report(dashboard.state_series, |stacked| StackedSeries {
            categories: stacked.categories,
            series: stacked.series.into_iter().map(map_series).collect(),
        }),
        summary: Summary {
            doctor_count: dashboard.summary.doctor_count,
            product_count: dashboard.summary.product_count,
            total_sales: dashboard.summary.total_sales,
            mean_profit: dashboard.summary.mean_profit,
        },
    }
}

/// Handle requests for the dashboard bundle
pub async fn get(State(state): State<ServerState>) -> Result<Json<Dashboard>, ServerError> {
    let dashboard = state.engine.dashboard().await?;
    Ok(Json(map_dashboard(dashboard)))
}
