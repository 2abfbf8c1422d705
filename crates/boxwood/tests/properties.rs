//! Property-based tests for measurement, tab cycling, and the
//! measurement/render agreement of escaped strings.

use boxwood::text::{height_for_width, line_widths, width_for_height};
use boxwood::{
    App, Color, ColorPair, GridCell, GridConfig, Owner, Rect, RootConfig, ScreenBuffer, Size,
    TextConfig, ansi,
};
use proptest::prelude::*;

// ==============================================================================
// Property 1: width_for_height produces a width whose height fits (P4)
// ==============================================================================

proptest! {
    #[test]
    fn bisected_width_fits_requested_height(text in "[a-z \n]{1,40}", h in 1i32..6) {
        if let Some(w) = width_for_height(&text, h) {
            prop_assert!(w >= 1);
            let measured = height_for_width(&text, w);
            prop_assert!(matches!(measured, Some(m) if (1..=h).contains(&m)));
        }
    }
}

// ==============================================================================
// Property 2: line widths always agree with the measured height
// ==============================================================================

proptest! {
    #[test]
    fn line_widths_match_height(text in "[a-z ]{0,40}", w in 1i32..20) {
        let heights = height_for_width(&text, w);
        let widths = line_widths(&text, w);
        match (heights, widths) {
            (Some(h), Some(ws)) => {
                prop_assert_eq!(h as usize, ws.len());
                prop_assert!(ws.iter().all(|&lw| lw <= w));
            }
            (None, None) => {}
            other => prop_assert!(false, "disagreement: {:?}", other),
        }
    }
}

// ==============================================================================
// Property 3: measuring the stripped string matches the painted columns
// ==============================================================================

proptest! {
    #[test]
    fn stripped_measurement_matches_painted_row(
        body in "[a-z ]{1,30}",
        split in 0usize..30,
        code in prop::sample::select(vec![0u16, 5, 31, 37, 40, 47]),
    ) {
        let at = split.min(body.chars().count());
        let source: String = body
            .chars()
            .take(at)
            .chain(format!("\u{1b}[{code}m").chars())
            .chain(body.chars().skip(at))
            .collect();
        prop_assert_eq!(&ansi::strip(&source), &body);

        let w = body.chars().count() as i32;
        let mut app = App::new(
            RootConfig::new().color(ColorPair::new(Color::White, Color::Black)),
        );
        app.set_screen(Size::new(w, 1));
        let added = app.add_text(
            Owner::Root,
            TextConfig::new(source).rect(Rect::new(0, 0, w, 1)),
        );
        prop_assert!(added.is_ok());
        let mut buf = ScreenBuffer::new(app.screen());
        app.render_to(&mut buf);

        let row: String = (0..w)
            .map(|x| buf.get(x, 0).map(|c| c.symbol).unwrap_or(' '))
            .collect();
        prop_assert_eq!(&row, &body);
        prop_assert_eq!(line_widths(&body, w), Some(vec![w]));
    }
}

// ==============================================================================
// Property 4: Tab cycles over exactly the interactable widgets (P5)
// ==============================================================================

proptest! {
    #[test]
    fn tab_cycle_visits_every_interactable(flags in prop::collection::vec(any::<bool>(), 1..8)) {
        prop_assume!(flags.iter().any(|&f| f));
        let mut app = App::new(RootConfig::new());
        app.set_screen(Size::new(40, 5));
        for (i, &interact) in flags.iter().enumerate() {
            let added = app.add_text(
                Owner::Root,
                TextConfig::new(i.to_string()).interact(interact),
            );
            prop_assert!(added.is_ok());
        }
        let mut buf = ScreenBuffer::new(app.screen());
        app.render_to(&mut buf);

        app.focus_next();
        let start = app.focused();
        prop_assert!(start.is_some());

        let eligible = flags.iter().filter(|&&f| f).count();
        let mut steps = 0usize;
        loop {
            app.focus_next();
            steps += 1;
            prop_assert!(steps <= eligible, "cycle longer than eligible set");
            if app.focused() == start {
                break;
            }
        }
        prop_assert_eq!(steps, eligible);
    }
}

// ==============================================================================
// Property 5: grid cells survive a resize-then-write round trip
// ==============================================================================

proptest! {
    #[test]
    fn grid_round_trip(w in 1i32..6, h in 1i32..6, x in 0i32..8, y in 0i32..8) {
        let mut app = App::new(RootConfig::new());
        let added = app.add_grid(Owner::Root, GridConfig::new(Size::new(1, 1)));
        prop_assert!(added.is_ok());
        let Ok(grid) = added else { unreachable!() };
        app.grid_resize(grid, Size::new(w, h));

        let cell = GridCell {
            color: ColorPair::new(Color::Red, Color::None),
            symbol: '#',
        };
        app.grid_set(grid, x, y, cell);
        let expected = (x < w && y < h).then_some(cell);
        prop_assert_eq!(app.grid_get(grid, x, y), expected);
    }
}
