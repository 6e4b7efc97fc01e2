use clap::ValueEnum;

/// 手動座標模式下未指定 X/Y 時的預設位移（像素）
pub const DEFAULT_MANUAL_OFFSET: i64 = 10;
pub const DEFAULT_MARGIN: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PositionMode {
    Preset,
    Manual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VerticalAnchor {
    Top,
    Bottom,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HorizontalAnchor {
    Left,
    Right,
    Center,
}

/// Logo 在畫面上的位置設定
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub mode: PositionMode,
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
    pub margin: u32,
    pub x: Option<i64>,
    pub y: Option<i64>,
}

impl Default for Placement {
    fn default() -> Self {
        Placement {
            mode: PositionMode::Preset,
            vertical: VerticalAnchor::Bottom,
            horizontal: HorizontalAnchor::Left,
            margin: DEFAULT_MARGIN,
            x: None,
            y: None,
        }
    }
}

impl Placement {
    pub fn preset(vertical: VerticalAnchor, horizontal: HorizontalAnchor, margin: u32) -> Self {
        Placement {
            mode: PositionMode::Preset,
            vertical,
            horizontal,
            margin,
            x: None,
            y: None,
        }
    }

    pub fn manual(x: i64, y: i64) -> Self {
        Placement {
            mode: PositionMode::Manual,
            x: Some(x),
            y: Some(y),
            ..Placement::default()
        }
    }

    pub fn describe(&self) -> String {
        match self.mode {
            PositionMode::Preset => format!(
                "{:?}-{:?}（邊距 {} px）",
                self.vertical, self.horizontal, self.margin
            ),
            PositionMode::Manual => format!(
                "X={} Y={}",
                self.x.unwrap_or(DEFAULT_MANUAL_OFFSET),
                self.y.unwrap_or(DEFAULT_MANUAL_OFFSET)
            ),
        }
    }
}

/// 產生 ffmpeg overlay 濾鏡的座標表達式
///
/// 預設位置模式輸出以 `main_w`/`main_h`（影片）與 `overlay_w`/`overlay_h`（Logo）
/// 表示的符號式，由 ffmpeg 在執行時求值；手動模式直接輸出 `X:Y`。
pub fn overlay_expression(placement: &Placement) -> String {
    if placement.mode == PositionMode::Manual {
        return format!(
            "{}:{}",
            placement.x.unwrap_or(DEFAULT_MANUAL_OFFSET),
            placement.y.unwrap_or(DEFAULT_MANUAL_OFFSET)
        );
    }

    let margin = placement.margin;
    let x = match placement.horizontal {
        HorizontalAnchor::Left => format!("{}", margin),
        HorizontalAnchor::Right => format!("main_w-overlay_w-{}", margin),
        HorizontalAnchor::Center => "(main_w-overlay_w)/2".to_string(),
    };
    let y = match placement.vertical {
        VerticalAnchor::Top => format!("{}", margin),
        VerticalAnchor::Bottom => format!("main_h-overlay_h-{}", margin),
        VerticalAnchor::Center => "(main_h-overlay_h)/2".to_string(),
    };
    format!("{}:{}", x, y)
}
