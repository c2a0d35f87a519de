use pairmatch_core::{IconSpec, Px, Rect, Shape};
use yew::prelude::*;

use crate::flow::Face;

pub(crate) const BACKGROUND: &str = "blue";
pub(crate) const FLASH: &str = "cyan";
const TILE_BACK: &str = "gold";
const HIGHLIGHT: &str = "red";
/// Icon distance from the tile edge.
const INSET: Px = 5;

fn place(rect: Rect) -> String {
    format!(
        "position: absolute; pointer-events: none; left: {}px; top: {}px; width: {}px; height: {}px;",
        rect.x, rect.y, rect.width, rect.height
    )
}

fn points(points: &[(Px, Px)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{},{}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn icon_svg(icon: IconSpec, size: Px) -> Html {
    let fill = icon.color.css_name();
    let half = size / 2;
    let far = size - INSET;
    match icon.shape {
        Shape::Diamond => html! {
            <polygon {fill} points={points(&[(half, INSET), (far, half), (half, far), (INSET, half)])}/>
        },
        Shape::Square => html! {
            <rect {fill}
                x={INSET.to_string()}
                y={INSET.to_string()}
                width={(size - 2 * INSET).to_string()}
                height={(size - 2 * INSET).to_string()}/>
        },
        Shape::Triangle => html! {
            <polygon {fill} points={points(&[(half, INSET), (INSET, far), (far, far)])}/>
        },
        Shape::Circle => html! {
            <circle {fill}
                cx={half.to_string()}
                cy={half.to_string()}
                r={(half - INSET).to_string()}/>
        },
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct TileProps {
    pub(crate) rect: Rect,
    pub(crate) face: Face,
}

#[function_component(TileView)]
pub(crate) fn tile_view(props: &TileProps) -> Html {
    let TileProps { rect, face } = props.clone();
    let size = rect.width.to_string();
    let body = match face {
        Face::Down => html! {
            <rect fill={TILE_BACK} width={size.clone()} height={size.clone()}/>
        },
        Face::Up(icon) => html! {
            <>
                <rect fill={BACKGROUND} width={size.clone()} height={size.clone()}/>
                {icon_svg(icon, rect.width)}
            </>
        },
    };

    html! {
        <svg style={place(rect)} width={size.clone()} height={size}>
            {body}
        </svg>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct HighlightProps {
    pub(crate) rect: Rect,
}

/// Box drawn around the hovered tile.
#[function_component(Highlight)]
pub(crate) fn highlight(props: &HighlightProps) -> Html {
    let Rect {
        x,
        y,
        width,
        height,
    } = props.rect;
    let outer = Rect::new(x - INSET, y - INSET, width + 2 * INSET, height + 2 * INSET);
    let style = format!(
        "{} box-sizing: border-box; border: {}px solid {};",
        place(outer),
        INSET,
        HIGHLIGHT
    );
    html! { <div {style}/> }
}
