use cubefield_core::{InputCommand, InputQueue, PointerSource};

fn mv(source: PointerSource, x: f32) -> InputCommand {
    InputCommand::PointerMove { source, x, y: 0.0 }
}

#[test]
fn commands_drain_in_arrival_order() {
    let mut q = InputQueue::default();
    q.push(InputCommand::PointerDown {
        source: PointerSource::Mouse,
        x: 1.0,
        y: 2.0,
    });
    q.push(mv(PointerSource::Mouse, 3.0));
    q.push(InputCommand::PointerUp {
        source: PointerSource::Mouse,
    });
    let cmds: Vec<_> = q.drain().into_iter().collect();
    assert_eq!(cmds.len(), 3);
    assert!(matches!(cmds[0], InputCommand::PointerDown { .. }));
    assert!(matches!(cmds[2], InputCommand::PointerUp { .. }));
    assert!(q.is_empty());
}

#[test]
fn moves_from_different_sources_are_kept_apart() {
    let mut q = InputQueue::default();
    q.push(mv(PointerSource::Mouse, 1.0));
    q.push(mv(PointerSource::Touch, 2.0));
    q.push(mv(PointerSource::Touch, 3.0));
    let cmds = q.drain();
    assert_eq!(cmds.len(), 2);
    assert_eq!(cmds[1], mv(PointerSource::Touch, 3.0));
}

#[test]
fn resizes_collapse_to_the_last() {
    let mut q = InputQueue::default();
    for w in 1..10 {
        q.push(InputCommand::Resize { width: w, height: 5 });
    }
    assert_eq!(q.len(), 1);
    assert_eq!(
        q.drain()[0],
        InputCommand::Resize {
            width: 9,
            height: 5
        }
    );
}

#[test]
fn queue_never_exceeds_capacity() {
    let mut q = InputQueue::with_capacity(8);
    for i in 0..100 {
        let source = if i % 2 == 0 {
            PointerSource::Mouse
        } else {
            PointerSource::Touch
        };
        q.push(InputCommand::PointerUp { source });
        assert!(q.len() <= 8);
    }
    assert_eq!(q.dropped(), 92);
}
