use super::{Color, Sprite};

pub const GLYPH_SIZE: i32 = 8;
pub const SHEET_COLUMNS: i32 = 16;
pub const SHEET_WIDTH: i32 = 128;
pub const SHEET_HEIGHT: i32 = 48;

/// First character on the sheet; glyphs run through ASCII 127.
pub const FIRST_GLYPH: u8 = b' ';

// 128x48 one-bit sheet. Every four characters carry 24 pixels as 6-bit
// digits offset by '0', least significant bit first, filled column by column.
const SHEET_DATA: [&str; 16] = [
    "?Q`0001oOch0o01o@F40o0<AGD4090LAGD<090@A7ch0?00O7Q`0600>00000000",
    "O000000nOT0063Qo4d8>?7a14Gno94AA4gno94AaOT0>o3`oO400o7QN00000400",
    "Of80001oOg<7O7moBGT7O7lABET024@aBEd714AiOdl717a_=TH013Q>00000000",
    "720D000V?V5oB3Q_HdUoE7a9@DdDE4A9@DmoE4A;Hg]oM4Aj8S4D84@`00000000",
    "OaPT1000Oa`^13P1@AI[?g`1@A=[OdAoHgljA4Ao?WlBA7l1710007l100000000",
    "ObM6000oOfMV?3QoBDD`O7a0BDDH@5A0BDD<@5A0BGeVO5ao@CQR?5Po00000000",
    "Oc``000?Ogij70PO2D]??0Ph2DUM@7i`2DTg@7lh2GUj?0TO0C1870T?00000000",
    "70<4001o?P<7?1QoHg43O;`h@GT0@:@LB@d0>:@hN@L0@?aoN@<0O7ao0000?000",
    "OcH0001SOglLA7mg24TnK7ln24US>0PL24U140PnOgl0>7QgOcH0K71S0000A000",
    "00H00000@Dm1S007@DUSg00?OdTnH7YhOfTL<7Yh@Cl0700?@Ah0300700000000",
    "<008001QL00ZA41a@6HnI<1i@FHLM81M@@0LG81?O`0nC?Y7?`0ZA7Y300080000",
    "O`082000Oh0827mo6>Hn?Wmo?6HnMb11MP08@C11H`08@FP0@@0004@000000000",
    "00P00001Oab00003OcKP0006@6=PMgl<@440MglH@000000`@000001P00000000",
    "Ob@8@@00Ob@8@Ga13R@8Mga172@8?PAo3R@827QoOb@820@0O`0007`0000007P0",
    "O`000P08Od400g`<3V=P0G`673IP0`@3>1`00P@6O`P00g`<O`000GP800000000",
    "?P9PL020O`<`N3R0@E4HC7b0@ET<ATB0@@l6C4B0O`H3N7b0?P01L3R000000020",
];

lazy_static::lazy_static! {
    static ref FONT_SHEET: Sprite = decode_sheet();
}

/// The built-in 8x8 monospace font. Lit pixels are white, the rest black;
/// every pixel is opaque.
pub fn font_sheet() -> &'static Sprite {
    &FONT_SHEET
}

/// Top-left corner of the glyph for `c` on the sheet. Characters without a
/// glyph map outside the sheet, where every lookup reads as background.
pub fn glyph_origin(c: u8) -> (i32, i32) {
    let index = c as i32 - FIRST_GLYPH as i32;
    (
        (index % SHEET_COLUMNS) * GLYPH_SIZE,
        (index / SHEET_COLUMNS) * GLYPH_SIZE,
    )
}

fn decode_sheet() -> Sprite {
    let mut sheet = Sprite::with_dimensions(SHEET_WIDTH, SHEET_HEIGHT);

    let (mut px, mut py) = (0, 0);
    for group in SHEET_DATA.iter().flat_map(|row| row.as_bytes().chunks(4)) {
        let bits = group.iter()
            .fold(0u32, |acc, &c| acc << 6 | u32::from(c.wrapping_sub(b'0')));

        for i in 0..24 {
            let color = if bits & (1 << i) != 0 { Color::WHITE } else { Color::BLACK };
            sheet.set_pixel(px, py, color.into());
            py += 1;
            if py == SHEET_HEIGHT {
                px += 1;
                py = 0;
            }
        }
    }

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph_rows(c: u8) -> Vec<String> {
        let sheet = font_sheet();
        let (ox, oy) = glyph_origin(c);
        (0..GLYPH_SIZE)
            .map(|j| {
                (0..GLYPH_SIZE)
                    .map(|i| if sheet.pixel_color(ox + i, oy + j) > 0 { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn sheet_is_fully_opaque() {
        let sheet = font_sheet();
        assert_eq!((sheet.width(), sheet.height()), (SHEET_WIDTH, SHEET_HEIGHT));
        for y in 0..SHEET_HEIGHT {
            for x in 0..SHEET_WIDTH {
                assert!(sheet.pixel_alpha(x, y));
            }
        }
    }

    #[test]
    fn decodes_recognizable_glyphs() {
        assert_eq!(glyph_rows(b'A'), [
            "..###...",
            ".##.##..",
            "##...##.",
            "##...##.",
            "#######.",
            "##...##.",
            "##...##.",
            "........",
        ]);
        assert_eq!(glyph_rows(b'H'), [
            "##...##.",
            "##...##.",
            "##...##.",
            "#######.",
            "##...##.",
            "##...##.",
            "##...##.",
            "........",
        ]);
    }

    #[test]
    fn space_is_blank() {
        assert!(glyph_rows(b' ').iter().all(|row| row == "........"));
    }

    #[test]
    fn glyphs_are_laid_out_sixteen_per_row() {
        assert_eq!(glyph_origin(b' '), (0, 0));
        assert_eq!(glyph_origin(b'/'), (15 * 8, 0));
        assert_eq!(glyph_origin(b'0'), (0, 8));
        assert_eq!(glyph_origin(b'A'), (8, 16));
    }
}
