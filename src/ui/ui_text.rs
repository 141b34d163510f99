/// Every user-facing label in one place.
pub struct UiText {
    pub app_title: &'static str,

    // Settings form
    pub settings_heading: &'static str,
    pub initial_weight_heading: &'static str,
    pub end_weight_heading: &'static str,
    pub deposit_heading: &'static str,
    pub duration_heading: &'static str,
    pub volume_heading: &'static str,
    pub fees_heading: &'static str,
    pub stars_label: &'static str,
    pub osmo_label: &'static str,
    pub swap_fee_label: &'static str,
    pub exit_fee_label: &'static str,
    pub run_button: &'static str,
    pub run_disabled_hint: &'static str,
    pub share_button: &'static str,
    pub share_copied: &'static str,
    pub price_waiting: &'static str,

    // Info panel
    pub info_heading: &'static str,
    pub daily_volume: &'static str,
    pub total_volume: &'static str,
    pub total_buys: &'static str,
    pub osmo_price: &'static str,
    pub start_price: &'static str,
    pub end_price: &'static str,
    pub initial_assets: &'static str,
    pub end_assets: &'static str,
    pub date_time: &'static str,
    pub exchange_rate: &'static str,
    pub stars_price: &'static str,

    // Central panel
    pub plot_x_axis: &'static str,
    pub plot_y_axis: &'static str,
    pub plot_series_name: &'static str,
    pub empty_chart_heading: &'static str,
    pub empty_chart_hint: &'static str,
    pub running_heading: &'static str,
    pub decode_warning_prefix: &'static str,
    pub dismiss: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "OSMOSIS LBP Simulator",

    settings_heading: "Settings",
    initial_weight_heading: "Initial Weight",
    end_weight_heading: "End Weight",
    deposit_heading: "Initial Deposit",
    duration_heading: "Duration",
    volume_heading: "Daily Volume (in $USD)",
    fees_heading: "Fees",
    stars_label: "STARS",
    osmo_label: "OSMO",
    swap_fee_label: "Swap",
    exit_fee_label: "Exit",
    run_button: "Run",
    run_disabled_hint: "Waiting for the OSMO price before a run can start",
    share_button: "Share",
    share_copied: "Link Copied",
    price_waiting: "fetching...",

    info_heading: "Simulation",
    daily_volume: "Daily Volume",
    total_volume: "Total Volume",
    total_buys: "Total Buys",
    osmo_price: "OSMO Price",
    start_price: "Start Price",
    end_price: "End Price",
    initial_assets: "Initial Assets",
    end_assets: "End Assets",
    date_time: "DateTime",
    exchange_rate: "Exchange Rate",
    stars_price: "STARS Price",

    plot_x_axis: "Time (UTC)",
    plot_y_axis: "OSMO per STARS",
    plot_series_name: "STARS/OSMO",
    empty_chart_heading: "No simulation yet",
    empty_chart_hint: "Adjust the settings and press Run",
    running_heading: "Running simulation...",
    decode_warning_prefix: "Ignored shared settings",
    dismiss: "Dismiss",
};
