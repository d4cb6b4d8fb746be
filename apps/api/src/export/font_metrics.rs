//! Static font-metric tables for the PDF base-14 Helvetica family.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em. Oblique faces share the
//! upright widths. Tables cover ASCII 0x20..=0x7E; index = (char as usize) - 32.
//! The handful of WinAnsi punctuation marks résumés actually use (bullets, dashes,
//! curly quotes) have their own entries; anything else falls back to an average width.

/// The four faces the exporter draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Regular,
    Bold,
    Oblique,
    BoldOblique,
}

impl Face {
    pub fn new(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Face::Regular,
            (true, false) => Face::Bold,
            (false, true) => Face::Oblique,
            (true, true) => Face::BoldOblique,
        }
    }

    /// PostScript name of the base-14 font.
    pub fn base_font(self) -> &'static str {
        match self {
            Face::Regular => "Helvetica",
            Face::Bold => "Helvetica-Bold",
            Face::Oblique => "Helvetica-Oblique",
            Face::BoldOblique => "Helvetica-BoldOblique",
        }
    }

    /// Resource name used in content streams.
    pub fn resource_name(self) -> &'static [u8] {
        match self {
            Face::Regular => b"F1",
            Face::Bold => b"F2",
            Face::Oblique => b"F3",
            Face::BoldOblique => b"F4",
        }
    }

    pub const ALL: [Face; 4] = [Face::Regular, Face::Bold, Face::Oblique, Face::BoldOblique];

    fn is_bold(self) -> bool {
        matches!(self, Face::Bold | Face::BoldOblique)
    }
}

/// Static character-width table for one weight.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    bullet: u16,
    en_dash: u16,
    em_dash: u16,
    single_quote: u16,
    double_quote: u16,
    /// Fallback for every other character.
    average_char_width: u16,
    pub space_width: u16,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            '•' => self.bullet,
            '–' => self.en_dash,
            '—' => self.em_dash,
            '\u{2018}' | '\u{2019}' => self.single_quote,
            '\u{201c}' | '\u{201d}' => self.double_quote,
            _ => self.average_char_width,
        }
    }

    /// Rendered width of `s` in points at `size_pt`.
    pub fn measure(&self, s: &str, size_pt: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size_pt / 1000.0
    }

    pub fn space(&self, size_pt: f32) -> f32 {
        f32::from(self.space_width) * size_pt / 1000.0
    }
}

pub fn get_metrics(face: Face) -> &'static FontMetricTable {
    if face.is_bold() {
        &HELVETICA_BOLD
    } else {
        &HELVETICA
    }
}

static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :   ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A   B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [   \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a   b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n   o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {   |    }    ~
        334, 260, 334, 584,
    ],
    bullet: 350,
    en_dash: 556,
    em_dash: 1000,
    single_quote: 222,
    double_quote: 333,
    average_char_width: 556,
    space_width: 278,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :   ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A   B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [   \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a   b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n   o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {   |    }    ~
        389, 280, 389, 584,
    ],
    bullet: 350,
    en_dash: 556,
    em_dash: 1000,
    single_quote: 278,
    double_quote: 500,
    average_char_width: 611,
    space_width: 278,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_width_matches_table() {
        for face in Face::ALL {
            let m = get_metrics(face);
            assert_eq!(m.measure(" ", 10.0), m.space(10.0));
        }
    }

    #[test]
    fn test_bold_is_never_narrower() {
        let text = "Architected distributed caching layer";
        assert!(
            get_metrics(Face::Bold).measure(text, 11.0)
                >= get_metrics(Face::Regular).measure(text, 11.0)
        );
    }

    #[test]
    fn test_measure_scales_with_size() {
        let m = get_metrics(Face::Regular);
        let small = m.measure("Rust", 10.0);
        let large = m.measure("Rust", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_known_widths() {
        let m = get_metrics(Face::Regular);
        // "Hi" = 722 + 222 units.
        assert!((m.measure("Hi", 10.0) - 9.44).abs() < 1e-4);
        assert!((m.measure("–", 10.0) - 5.56).abs() < 1e-4);
    }

    #[test]
    fn test_oblique_shares_upright_widths() {
        assert!(std::ptr::eq(get_metrics(Face::Oblique), get_metrics(Face::Regular)));
        assert!(std::ptr::eq(get_metrics(Face::BoldOblique), get_metrics(Face::Bold)));
    }
}
