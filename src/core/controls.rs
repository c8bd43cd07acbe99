//! 阅读控件：字号档位与播放倍速，都是封闭的枚举。

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 控件取值错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("不支持的播放倍速: {0}")]
    UnsupportedRate(String),
}

/// 字号调整方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontDirection {
    Increase,
    Decrease,
}

/// 正文字号档位，范围为 0..=2
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum FontSizeLevel {
    #[default]
    Normal,
    Large,
    ExtraLarge,
}

impl FontSizeLevel {
    pub const MIN: FontSizeLevel = FontSizeLevel::Normal;
    pub const MAX: FontSizeLevel = FontSizeLevel::ExtraLarge;

    /// 按数值取档位，超出范围时截断到边界
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => FontSizeLevel::Normal,
            1 => FontSizeLevel::Large,
            _ => FontSizeLevel::ExtraLarge,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            FontSizeLevel::Normal => 0,
            FontSizeLevel::Large => 1,
            FontSizeLevel::ExtraLarge => 2,
        }
    }

    /// 向指定方向移动一档，到达边界时保持不变
    pub fn step(self, direction: FontDirection) -> Self {
        match direction {
            FontDirection::Increase => Self::from_level(self.level().saturating_add(1)),
            FontDirection::Decrease => Self::from_level(self.level().saturating_sub(1)),
        }
    }

    /// 正文使用的样式类
    pub fn class(self) -> &'static str {
        match self {
            FontSizeLevel::Normal => "prose-lg",
            FontSizeLevel::Large => "prose-xl",
            FontSizeLevel::ExtraLarge => "prose-2xl",
        }
    }

    pub fn can_increase(self) -> bool {
        self < Self::MAX
    }

    pub fn can_decrease(self) -> bool {
        self > Self::MIN
    }
}

/// 音频播放倍速
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackRate {
    Slow,
    #[default]
    Normal,
    Quick,
    Fast,
    Double,
}

impl PlaybackRate {
    /// 选择框中的全部选项，按显示顺序排列
    pub const ALL: [PlaybackRate; 5] = [
        PlaybackRate::Slow,
        PlaybackRate::Normal,
        PlaybackRate::Quick,
        PlaybackRate::Fast,
        PlaybackRate::Double,
    ];

    pub fn as_f64(self) -> f64 {
        match self {
            PlaybackRate::Slow => 0.75,
            PlaybackRate::Normal => 1.0,
            PlaybackRate::Quick => 1.25,
            PlaybackRate::Fast => 1.5,
            PlaybackRate::Double => 2.0,
        }
    }

    /// 选项的取值
    pub fn value(self) -> &'static str {
        match self {
            PlaybackRate::Slow => "0.75",
            PlaybackRate::Normal => "1",
            PlaybackRate::Quick => "1.25",
            PlaybackRate::Fast => "1.5",
            PlaybackRate::Double => "2",
        }
    }

    /// 选项的显示文字
    pub fn label(self) -> String {
        format!("{}x", self.value())
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for PlaybackRate {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(['x', 'X']);
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ControlError::UnsupportedRate(s.to_string()))?;

        Self::ALL
            .into_iter()
            .find(|rate| rate.as_f64() == value)
            .ok_or_else(|| ControlError::UnsupportedRate(s.to_string()))
    }
}
