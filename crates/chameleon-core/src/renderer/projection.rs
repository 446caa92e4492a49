use crate::renderer::instance::{RenderBuffer, RenderInstance, SpriteKind};
use crate::session::ChameleonQuest;

const HEAD_SIZE: f32 = 160.0;
const QUESTION_CARD_SIZE: f32 = 360.0;
const HIGHLIGHT_SCALE: f32 = 1.25;
const DIMMED_ALPHA: f32 = 0.85;

/// Write the session's visible state into `buffer`, back to front:
/// question cards, answer cards, tongue, head. Reads only.
pub fn build_render_buffer(session: &ChameleonQuest, buffer: &mut RenderBuffer) {
    buffer.clear();
    let spawner = session.spawner();

    for card in spawner.questions() {
        buffer.push(
            RenderInstance::new(
                SpriteKind::QuestionCard,
                card.position.x,
                card.position.y,
                QUESTION_CARD_SIZE,
            )
            .with_tag(card.group.0),
        );
    }

    for card in spawner.answers().chain(session.caught().map(|c| &c.card)) {
        let size = card.radius * 2.0;
        let instance = RenderInstance::new(SpriteKind::AnswerCard, card.position.x, card.position.y, size)
            .with_tag(card.id.0);
        let instance = if card.highlighted {
            RenderInstance {
                scale: size * HIGHLIGHT_SCALE,
                ..instance.with_variant(1.0)
            }
        } else {
            instance.with_alpha(DIMMED_ALPHA)
        };
        buffer.push(instance);
    }

    let chameleon = session.chameleon();
    if let Some(tongue) = chameleon.tongue() {
        let origin = tongue.origin();
        let tip = tongue.tip();
        buffer.push(
            RenderInstance::new(SpriteKind::TongueBody, origin.x, origin.y, tongue.length())
                .with_rotation(tongue.angle_deg().to_radians()),
        );
        buffer.push(RenderInstance::new(
            SpriteKind::TongueTip,
            tip.x,
            tip.y,
            tongue.tip_radius() * 2.0,
        ));
    }

    let position = chameleon.position();
    buffer.push(
        RenderInstance::new(SpriteKind::ChameleonHead, position.x, position.y, HEAD_SIZE)
            .with_rotation(chameleon.current_angle().to_radians())
            .with_variant(chameleon.expression().index() as f32),
    );

    if chameleon.shows_cooldown() {
        let fill = chameleon.cooldown_fraction(session.now());
        buffer.push(
            RenderInstance::new(SpriteKind::CooldownRing, position.x, position.y, HEAD_SIZE * 1.2)
                .with_variant(fill),
        );
    }
}
