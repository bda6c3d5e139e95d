//! Dashboard screen rendering
//!
//! Renders the search bar, current-weather panel, forecast strip, and
//! news section from the aggregated state. The placeholder text for
//! articles without an image is decided here, not by the news client.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::{ForecastPoint, NewsArticle, WeatherSnapshot};

/// Placeholder shown for articles the provider sent without an image
const NO_IMAGE_PLACEHOLDER: &str = "[no image]";

/// Human-readable label for an air quality index (1-5)
fn aqi_label(aqi: u8) -> &'static str {
    match aqi {
        1 => "good",
        2 => "fair",
        3 => "moderate",
        4 => "poor",
        5 => "very poor",
        _ => "unknown",
    }
}

/// Renders the full dashboard
pub fn render_dashboard(frame: &mut Frame, app: &App) {
    let accent = app.theme.accent_color();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // search bar
            Constraint::Length(11), // current weather
            Constraint::Length(7),  // forecast strip
            Constraint::Min(6),     // news
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    render_search_bar(frame, app, chunks[0], accent);
    render_weather_panel(frame, app, chunks[1], accent);
    render_forecast_strip(frame, app, chunks[2], accent);
    render_news_section(frame, app, chunks[3], accent);
    render_footer(frame, app, chunks[4]);
}

/// Renders the search input with a trailing cursor marker
fn render_search_bar(frame: &mut Frame, app: &App, area: Rect, accent: Color) {
    let input = Paragraph::new(format!("{}\u{2588}", app.search_input))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .title(" Search: City, Country "),
        );
    frame.render_widget(input, area);
}

/// Renders the current-conditions panel
fn render_weather_panel(frame: &mut Frame, app: &App, area: Rect, accent: Color) {
    let title = format!(
        " Current weather in {} ({}) ",
        app.location.city, app.location.country_code
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(title);

    let lines = if app.is_loading && app.weather.is_none() {
        vec![Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Cyan),
        ))]
    } else if let Some(weather) = &app.weather {
        weather_lines(weather, app.theme.label(), accent)
    } else {
        vec![Line::from(Span::styled(
            app.weather_notice.as_deref().unwrap_or("No data"),
            Style::default().fg(Color::Red),
        ))]
    };

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Formats the weather snapshot fields as display lines
fn weather_lines<'a>(weather: &'a WeatherSnapshot, band: &'a str, accent: Color) -> Vec<Line<'a>> {
    let air_quality = match weather.air_quality {
        Some(aqi) => format!("index {} ({})", aqi, aqi_label(aqi)),
        None => "unavailable".to_string(),
    };

    vec![
        Line::from(vec![
            Span::styled(
                format!("{:.1}°C", weather.temp),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}  ({})", weather.description, band)),
        ]),
        Line::from(format!("Feels like: {:.1}°C", weather.feels_like)),
        Line::from(format!(
            "Min: {:.1}°C  Max: {:.1}°C",
            weather.temp_min, weather.temp_max
        )),
        Line::from(format!("Humidity: {}%", weather.humidity)),
        Line::from(format!("Pressure: {:.0} hPa", weather.pressure)),
        Line::from(format!("Wind: {:.1} m/s", weather.wind_speed)),
        Line::from(format!("Rain (1h): {:.1} mm", weather.rain_chance)),
        Line::from(format!("Air quality: {}", air_quality)),
    ]
}

/// Renders the forecast strip as equal-width cards
fn render_forecast_strip(frame: &mut Frame, app: &App, area: Rect, accent: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(" Forecast ");

    if app.forecast.is_empty() {
        let text = app
            .forecast_notice
            .as_deref()
            .unwrap_or("No forecast available");
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let constraints: Vec<Constraint> = app
        .forecast
        .iter()
        .map(|_| Constraint::Ratio(1, app.forecast.len() as u32))
        .collect();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (point, card) in app.forecast.iter().zip(cards.iter()) {
        render_forecast_card(frame, point, *card);
    }
}

/// Renders one forecast card
fn render_forecast_card(frame: &mut Frame, point: &ForecastPoint, area: Rect) {
    let lines = vec![
        Line::from(point.timestamp.format("%d %b %H:%M").to_string()),
        Line::from(Span::styled(
            format!("{:.1}°C", point.temp),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{:.0}° / {:.0}°", point.temp_min, point.temp_max)),
        Line::from(point.description.clone()),
    ];

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(card, area);
}

/// Renders the selected headline and the article selector list
fn render_news_section(frame: &mut Frame, app: &App, area: Rect, accent: Color) {
    let title = format!(" Top news ({}) ", app.location.country_code);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(title);

    if app.news.is_empty() {
        let text = app.news_notice.as_deref().unwrap_or("No news available");
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let mut lines = Vec::new();
    if let Some(selected) = app.news.get(app.selected_news_index) {
        lines.push(Line::from(Span::styled(
            selected.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            article_image_text(selected),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    for (i, article) in app.news.iter().enumerate() {
        let style = if i == app.selected_news_index {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(
            format!("{} {}", if i == app.selected_news_index { ">" } else { " " }, article.title),
            style,
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Image line for an article; the placeholder is a presentation decision
fn article_image_text(article: &NewsArticle) -> String {
    match &article.image_url {
        Some(url) => url.clone(),
        None => NO_IMAGE_PLACEHOLDER.to_string(),
    }
}

/// Renders notices or the key help line
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = if let Some(notice) = &app.search_notice {
        (notice.clone(), Color::Red)
    } else if app.is_loading {
        ("Loading...".to_string(), Color::Cyan)
    } else {
        (
            "Type a location and press Enter · \u{2190}/\u{2192} select news · Esc quit".to_string(),
            Color::DarkGray,
        )
    };

    let footer = Paragraph::new(text).style(Style::default().fg(color));
    frame.render_widget(footer, area);
}
